fn main() {
    if let Err(err) = integration_map::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
