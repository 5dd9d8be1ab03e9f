use std::time::Duration;

pub const HELLO_MESSAGE: &str = "Hello CA Final Aspirant! 👋 I'm your IDT Expert AI. I'm updated with Finance Act 2025 and the Sep '25 amendments. You can now type, speak, or even attach a photo of your IDT query. How can I help you today?";

/// Persona and answering rules sent with every completion request.
pub const SYSTEM_INSTRUCTION: &str = r#"
You are an expert Indirect Tax (IDT) faculty and Chartered Accountant with deep knowledge of GST, Customs, and FTP as per Finance Act 2025 applicable for CA exams.
Your role is to explain concepts in simple, structured, and exam-oriented language.

Always assume the user is a CA student preparing for Sep 2025/Jan 2026 and May/Nov 2026 attempts.

CRITICAL BEHAVIOR RULES:
1. Format your response exactly as follows for concept doubts:
   - **Concept explanation (simple language)**: [Explain clearly]
   - **Relevant section reference**: [Section No. & Act]
   - **Practical example with numbers**: [Example to illustrate]
   - **Exam trick / common mistake**: [Warning or mnemonic]
   - **Short summary revision points**: [Bullet points]

2. If the user asks a practical question:
   - Solve it step-by-step.
   - Provide "Working Notes" for every calculation.
   - Use comparison tables if multiple provisions apply.

3. Highlight 2025/2026 Amendments specifically:
   - Mention Section 74A for FY 2024-25 onwards (New assessment section).
   - Mention un-denatured extra neutral alcohol exclusion.
   - Mention GSTR-7 monthly mandatory filing updates.
   - Mention the new pre-deposit limits (reduced from 25cr/50cr to 20cr/40cr).

4. Maintain a professional yet supportive tone. Use terminology like "Recipient", "Supplier", "Deemed Supply", "Taxable Person" correctly but explain them if they are complex.

5. Knowledge Base: Refer to the "IDT Notes' Digest" context provided by the user, specifically the statutory updates for Sep'25.
"#;

/// Chapters offered in the quick-topic screen.
pub const TOPIC_LIST: &[&str] = &[
    "Supply under GST",
    "Charge of GST",
    "Time of Supply",
    "Value of Supply",
    "Place of Supply",
    "Exemptions",
    "Input Tax Credit",
    "Registration",
    "Returns",
    "Refunds",
    "Assessment & Audit",
    "Inspection, Search, Seizure & Arrest",
    "Demands & Recovery",
    "Liability in Certain Cases",
    "Appeals & Revisions",
    "Customs Duty & Types",
    "Customs Valuation",
    "Importation & Exportation",
    "Warehousing",
    "Foreign Trade Policy",
];

pub fn topic_prompt(topic: &str) -> String {
    format!("Explain the core concept of {topic} briefly in exam format.")
}

/// Shown as the user turn when a submission carries only an image.
pub const IMAGE_PLACEHOLDER: &str = "[image attached]";

/// Sent instead of the (blank) user text when a submission carries only
/// an image.
pub const IMAGE_PROMPT: &str = "Please explain this IDT concept from the image.";

pub const MISSING_KEY_MESSAGE: &str =
    "Error: API key is missing. Set GEMINI_API_KEY or add `api_key` to your configuration file.";

pub const STREAM_ERROR_MESSAGE: &str = "Sorry, I encountered an error while processing your request. Please check your connection or API key and try again.";

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Fixed sampling temperature for every request.
pub const TEMPERATURE: f32 = 0.7;

/// Locale handed to the external dictation command.
pub const DICTATION_LOCALE: &str = "en-IN";

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

pub const LOG_FILE_PATH: &str = "/tmp/taxtutor.log";

pub const FRAME_DURATION: Duration = Duration::from_millis(100);
