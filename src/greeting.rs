/// Banner line printed before the greeting when the binary starts
pub const STARTUP_BANNER: &str = "Application started";

pub fn greet(name: &str) -> String {
    format!("Hello, {}!", name)
}
