// Copyright 2019 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Thin, safe wrappers over the host queries used by the hello-world programs.

pub mod hostname;
pub mod time;
pub mod uname;
