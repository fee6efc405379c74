// Test case for NO_PRINTLN lint

fn bad_println() {
    println!("Sanitised GET - keys: #markup");
}

fn bad_eprintln() {
    eprintln!("destination rejected");
}

fn bad_dbg() {
    let removed = vec!["#markup"];
    dbg!(removed);
}

// Good: using tracing
fn good_tracing() {
    tracing::warn!(request_id = "req-1", "Sanitised GET - keys: #markup");
}

fn main() {
    bad_println();
    bad_eprintln();
    bad_dbg();
    good_tracing();
}
