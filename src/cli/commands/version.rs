/// Execute version command
pub fn execute() {
    println!("company-info {}", env!("CARGO_PKG_VERSION"));
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!();
    println!("License: {}", env!("CARGO_PKG_LICENSE"));
}
