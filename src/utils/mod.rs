//! Small text helpers shared by the formatter and the hosts.

pub mod line_ending;
