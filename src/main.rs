fn main() {
    if let Err(err) = plan_dashboard::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
