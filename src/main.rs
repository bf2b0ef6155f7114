const USAGE: &str =
  "Usage: spaceremit-log-listener [--version | -V | --help | -h | --install | --uninstall]";

#[derive(Debug, PartialEq)]
enum Command {
  Serve,
  Version,
  Help,
  Install,
  Uninstall,
  Unknown(String),
}

fn parse_command(arg: Option<&str>) -> Command {
  match arg {
    None => Command::Serve,
    Some("--version" | "-V") => Command::Version,
    Some("--help" | "-h") => Command::Help,
    Some("--install") => Command::Install,
    Some("--uninstall") => Command::Uninstall,
    Some(other) => Command::Unknown(other.to_string()),
  }
}

#[tokio::main]
async fn main() {
  // Minimal CLI: --version, --help, and the install/uninstall lifecycle steps
  let arg = std::env::args().nth(1);
  let result = match parse_command(arg.as_deref()) {
    Command::Serve => spaceremit_log_listener::app::run().await,
    Command::Version => {
      println!("spaceremit-log-listener {}", env!("CARGO_PKG_VERSION"));
      return;
    }
    Command::Help => {
      println!("{USAGE}");
      return;
    }
    Command::Install => spaceremit_log_listener::app::install().await,
    Command::Uninstall => spaceremit_log_listener::app::uninstall().await,
    Command::Unknown(arg) => {
      eprintln!("error: unknown argument '{arg}'");
      eprintln!("{USAGE}");
      std::process::exit(2);
    }
  };

  if let Err(e) = result {
    eprintln!("error: {e}");
    std::process::exit(1);
  }
}
