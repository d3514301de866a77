//! Shared file texts for unit tests.

pub const TARGET_HEADER: &str = "/*
 * This file is part of the Acme distribution.
 * Copyright (c) 2020 The Author.
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, version 3.
 */
";

pub const OTHER_HEADER: &str = "/*
 * MIT License
 *
 * Copyright (c) 2020 The Author
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the \"Software\").
 */";

pub const BODY: &str = "const http = require('http');

const hostname = '127.0.0.1';
const port = 3000;
";

pub fn without_license() -> String {
    BODY.to_string()
}

pub fn with_target_license() -> String {
    format!("{}\n{}", TARGET_HEADER, BODY)
}

pub fn with_other_license() -> String {
    format!("{}\n\n{}", OTHER_HEADER, BODY)
}

pub fn with_build_tag(header: &str) -> String {
    format!(
        "\n// +build tools\n\n{}\n\npackage tools\n\n/* Doc comment with a license word. */\nfunc main() {{}}\n",
        header.trim()
    )
}
