// Copyright 2024 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{BUILD_DATE, BUILD_TIME, VERSION};

/// Fixed text surrounding the report of one of the demo programs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edition {
    /// Banner title.
    pub title: &'static str,
    /// Width of the `=` rules framing the banner.
    pub rule_width: usize,
    /// Lines printed between the banner and the system information.
    pub greeting: Vec<String>,
    /// Attribution lines closing the report.
    pub footer: Vec<String>,
    /// Name used in the usage hint when the program was started without `argv[0]`.
    pub default_program_name: &'static str,
}

impl Edition {
    /// The custom recipe demo: host name and clock, build system attribution.
    pub fn recipe_demo() -> Self {
        Edition {
            title: "Hello World - Yocto Recipe Demo",
            rule_width: 37,
            greeting: vec![
                "Hello from Yocto!".to_string(),
                "This is a custom recipe running on NVIDIA Jetson.".to_string(),
            ],
            footer: vec![
                "This application was built using:".to_string(),
                "  - Yocto Project BitBake build system".to_string(),
                format!("  - Custom recipe: hello-world_{VERSION}.bb"),
                "  - Cross-compilation for ARM64".to_string(),
            ],
            default_program_name: "hello-world",
        }
    }

    /// The Yocto edition: full system identity and build timestamp.
    pub fn yocto() -> Self {
        Edition {
            title: "Hello World - Yocto Edition",
            rule_width: 32,
            greeting: Vec::new(),
            footer: vec![
                "This application was built with Yocto Project!".to_string(),
                format!("Build Date: {BUILD_DATE} {BUILD_TIME}"),
            ],
            default_program_name: "hello-world-uname",
        }
    }

    pub(crate) fn rule(&self) -> String {
        "=".repeat(self.rule_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_demo() {
        let edition = Edition::recipe_demo();
        assert_eq!(edition.rule(), "=====================================");
        assert_eq!(edition.footer.len(), 4);
        assert_eq!(edition.footer[2], "  - Custom recipe: hello-world_1.0.bb");
    }

    #[test]
    fn test_yocto() {
        let edition = Edition::yocto();
        assert_eq!(edition.rule().len(), 32);
        assert!(edition.greeting.is_empty());
        let build = regex::Regex::new(
            r"^Build Date: [A-Z][a-z]{2} [ 0-9]\d \d{4} \d{2}:\d{2}:\d{2}$",
        )
        .unwrap();
        assert!(build.is_match(&edition.footer[1]), "{}", edition.footer[1]);
    }
}
