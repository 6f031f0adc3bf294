fn main() {
    if let Err(err) = chartdeck::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
