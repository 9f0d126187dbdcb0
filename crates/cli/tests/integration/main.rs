//! End-to-end tests driving `ocauto` against a fake installer script.

#![cfg(unix)]

mod create_tests;
mod destroy_tests;
mod list_tests;
