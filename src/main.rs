use issuesmith::cli;
use issuesmith::ui::output;

fn main() {
    if let Err(e) = cli::run() {
        output::error(format!("{:#}", e));
        std::process::exit(1);
    }
}
