fn main() {
    if let Err(err) = book_reorder::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
