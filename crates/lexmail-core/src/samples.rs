//! Canned inputs for trying the assistant without real correspondence.

pub const SAMPLE_EMAIL: &str = "Hello Team,\n\nPlease approve the proposed changes to the MSA. This is fairly urgent, ideally by end of week. Also, could you clarify the liability limits?\n\nThanks,\nBuyer";

pub const SAMPLE_CONTRACT: &str =
    "Refer to Clause 9.1 (Confidentiality) and Clause 10.2 (Limitation of Liability).";
