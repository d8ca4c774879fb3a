use clap::arg;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("linktally")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("linktally")
        .about("Fetch every URL in a list and count the links pointing back at each page's own domain")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner, progress bar and summary").required(false))
        .arg(
            arg!(-v --"verbose")
                .required(false)
                .help("Increase log verbosity (-v info, -vv debug). RUST_LOG overrides this.")
                .action(clap::ArgAction::Count),
        )
        .arg(
            arg!(-i --"input" <PATH>)
                .required(false)
                .help("Newline-delimited file of URLs to fetch")
                .default_value("urls.txt"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("File to write one result line per URL to (overwritten)")
                .default_value("results.txt"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Per-request timeout in seconds")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("10"),
        )
        .arg(
            arg!(-t --"threads" <NUM_WORKERS>)
                .required(false)
                .help("Maximum number of requests in flight at once")
                .value_parser(clap::value_parser!(usize))
                .default_value("64"),
        )
        .arg(
            arg!(--"max-redirects" <NUM>)
                .required(false)
                .help("Redirects to follow per request (0 disables following)")
                .value_parser(clap::value_parser!(usize))
                .default_value("5"),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Output format: text, json")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
}
