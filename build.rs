//! Retrieves information about the version of the engine from Git and the build
//! environment. `shadow-rs` writes it to the output directory so that the
//! engine can report how it was built at runtime.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
