use nu_ansi_term::Color::{Cyan, Green, Red};

/// Print a pipeline progress message on the job console.
pub fn info(message: &str) {
    println!("{}", Cyan.bold().italic().paint(message));
}

/// Print a warning, with the offending data, on the job console.
pub fn warn(message: &str, data: &str) {
    println!(
        "{} \n {} ",
        Cyan.bold().italic().paint(message),
        Red.bold().italic().paint(data)
    );
}

/// Print a completion message on the job console.
pub fn done(message: &str) {
    println!("{}", Green.bold().paint(message));
}

/// Print a payload verbatim, without styling, so that YAML output stays copy-pasteable
/// from the job console.
pub fn data(payload: &str) {
    println!("{payload}");
}
