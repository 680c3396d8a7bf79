// SPDX-License-Identifier: MIT OR Apache-2.0
// Exit codes for CI triage
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_VALIDATION_FAILED: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
