//! Help, version and usage text.

pub const MISSING_URL: &str = "Please specify a URL using the -u option.";

pub const USAGE: &str = "Usage: kfetch -u <URL> [-f <output_path>] [-m <method>] [-d <body>] \
[-H <header>]... [-c <ca_path>] [-v] [-h]";

pub fn version_line() -> String {
    format!("kfetch v{}", env!("CARGO_PKG_VERSION"))
}

pub fn help_text() -> String {
    let rule = "-".repeat(72);
    format!(
        "\n{rule}\n\
{version}\n\
A minimal HTTP(S) fetcher: one request, body saved to a file and echoed.\n\
Usage: kfetch -u <URL> [options]\n\
Options:\n\
-h                Display this help.\n\
-v                Display the version.\n\
-u <URL>          URL to fetch.\n\
-f <path>         Output file path (default: output.txt).\n\
-m <method>       HTTP method (default: GET).\n\
-d <data>         Request body.\n\
-H <header>       Request header, e.g. \"Accept: text/html\". Repeatable.\n\
-c <path>         CA certificate bundle used to verify the server.\n\
Exit status is 1 on usage errors, unwritable output or a failed transfer.\n\
{rule}\n\n",
        rule = rule,
        version = version_line()
    )
}
