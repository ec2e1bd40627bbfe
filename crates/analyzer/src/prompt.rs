//! Rephrase prompt assembly.
//!
//! The analyzer never calls a model itself; this only lays out the text a
//! caller sends to one.

/// Build the rewrite prompt for `message` from a rendered tone report.
pub fn build_rephrase_prompt(report: &str, message: &str) -> String {
    format!(
        "You are an expert communication assistant.\n\n\
         Here is a detailed tone profile describing the user's communication style:\n\n\
         {report}\n\n\
         ---\n\n\
         Please rephrase the following message so that it matches the user's tone profile \
         as closely as possible.\n\n\
         Message to rephrase:\n\
         \"\"\"{message}\"\"\"\n\n\
         Rephrased message:"
    )
}
