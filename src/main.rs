use plainobjects::cli::{print_messages, RuntimeConfig};

fn main() {
    let config = match RuntimeConfig::from_cli() {
        Ok(config) => config,
        Err(message) => {
            print_messages(&[message]);
            std::process::exit(1);
        }
    };
    let messages = plainobjects::run(&config);
    if print_messages(&messages) {
        std::process::exit(1);
    }
}
