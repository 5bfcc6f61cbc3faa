//! Output macros shared by the command-line crates.
//!
//! User-facing results go to stdout, errors to stderr. Diagnostics belong in
//! `tracing`, not here.

#[macro_export]
macro_rules! tfe_println {
    () => {
        println!()
    };
    ($($arg:tt)*) => {
        println!("{}", format!($($arg)*))
    }
}

#[macro_export]
macro_rules! tfe_error {
    ($($arg:tt)*) => {
        eprintln!("{}", format!($($arg)*))
    }
}

#[macro_export]
macro_rules! tfe_warning {
    ($($arg:tt)*) => {
        eprintln!("warning: {}", format!($($arg)*))
    }
}
