use marketsim::app;

fn main() {
    std::process::exit(app::startup::run());
}
