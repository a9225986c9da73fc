//! Two-player chess rules engine: it keeps the board state, enumerates the
//! moves of each piece, detects check and checkmate and executes the special
//! rules (castling, en passant and promotion). For more information, see
//! [README].
//!
//! [README]: https://github.com/tabiya-chess/tabiya/blob/main/README.md

// TODO: Gradually move most of warnings to deny.
#![warn(missing_docs, variant_size_differences)]
// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]
// Rustdoc lints.
#![warn(
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![deny(clippy::perf)]

pub mod chess;

mod engine;
pub use engine::Engine;
use shadow_rs::shadow;

shadow!(build);

/// Returns the full engine version that can be used to identify how it was
/// built in the first place.
fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints informations about the engine version and GitHub repository on
/// engine startup.
pub fn print_engine_info() {
    println!("Tabiya chess rules engine {}", engine_version());
    println!("<https://github.com/tabiya-chess/tabiya>");
}

/// Prints the build type and whether the build is clean on engine startup.
pub fn print_binary_info() {
    println!("Release build: {}", !shadow_rs::is_debug());
    if !shadow_rs::git_clean() {
        println!("Warning: built with uncommitted changes");
    }
    println!();
}
