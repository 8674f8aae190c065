use nu_ansi_term::Color::{Cyan, Green, Red, Yellow};

/// Print a labelled result on console, e.g. the key a chart was published to.
pub fn result(label: &str, value: &str) {
    println!("{} {}", Cyan.bold().paint(format!("{label}:")), Green.paint(value));
}

/// Print a list of results on console, one per line, under a heading.
pub fn list<I, S>(heading: &str, items: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    println!("{}", Cyan.bold().italic().paint(heading));
    let mut empty = true;
    for item in items {
        empty = false;
        println!("  {}", Green.paint(item.as_ref()));
    }
    if empty {
        println!("  {}", Yellow.italic().paint("(none)"));
    }
}

/// Print warning on console.
pub fn warn(message: &str, data: &str) {
    println!(
        "{} \n {} ",
        Cyan.bold().italic().paint(message),
        Red.bold().italic().paint(data)
    );
}
