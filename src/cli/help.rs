//! Help message display for CLI.

#![allow(clippy::print_stdout)]

use crate::config::Config;

/// Print help message based on configuration state.
pub fn print_smart_help(config: &Config) {
    print!("{}", smart_help(config));
}

fn smart_help(config: &Config) -> String {
    if config.models.is_empty() {
        first_time_help()
    } else {
        configured_help()
    }
}

/// Setup guide for first-time users.
fn first_time_help() -> String {
    "\
No models configured. Get started with cropscan:

1. Initialize configuration:
   cropscan config init

2. Point the three model slots at your ONNX models and label files
   in the config file (see 'cropscan config path'):
   [models.corn]     path, labels
   [models.apple]    path, labels
   [models.general]  path, labels

3. Optionally add a remediation table:
   [remediation]
   path = \"disease_solutions.csv\"

4. Verify the models load:
   cropscan models check

5. Diagnose leaf photos:
   cropscan leaf.jpg

Run 'cropscan -h' for all options.
"
    .to_string()
}

/// Brief usage reminder for configured users.
fn configured_help() -> String {
    "\
Usage: cropscan [INPUTS]... [OPTIONS]

Example: cropscan leaves/ https://example.com/leaf.jpg -f json

Run 'cropscan -h' for all options or 'cropscan models check' to verify models.
"
    .to_string()
}
