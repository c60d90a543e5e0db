use lazy_static::lazy_static;

lazy_static! {
    pub static ref BLESS: bool = std::env::var("BLESS") == Ok("1".into());
}

macro_rules! prefix_severity {
    (Suggestion, $content:expr) => {
        format!("Hint: {}", $content)
    };

    ($other:ident, $content:expr) => {
        $content
    };
}

/// Builds a multi-line failure report.
macro_rules! report {
    ($($severity:ident: $($content:expr),*;)*) => {{
        let mut lines: Vec<String> = Vec::new();
        $(lines.push(prefix_severity!($severity, format!($($content),*)));)*
        lines.join("\n")
    }};
}

macro_rules! print_fail {
    ($($severity:ident: $($content:expr),*;)*) => {
        fail!(report! { $($severity: $($content),*;)* })
    };
}

macro_rules! fail {
    ($report:expr) => {
        libtest_mimic::Outcome::Failed { msg: Some($report) }
    };
}
