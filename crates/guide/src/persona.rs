//! Fixed guide strings: the persona sent with every generation request
//! and the canned user-facing messages.

/// Default generation model.
pub const MODEL_ID: &str = "gemini-2.5-flash";

/// System instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert local guide for Austin, Texas.\n\
You are embedded in a 3D map application.\n\
When the user selects a landmark, tell them interesting facts, history, or current vibes about it.\n\
Keep your responses concise (under 3 sentences unless asked for more) and engaging.\n\
If asked about places, mention nearby coffee shops, music venues, or bat watching spots if relevant.\n\
Use the search tool to find up-to-date events or ratings if specifically asked.";

/// First transcript entry of every session.
pub const WELCOME_MESSAGE: &str =
    "Welcome to Austin! Click on a landmark to learn more, or ask me anything about the city.";

/// The single user-facing failure string; every gateway failure
/// resolves to exactly this text.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error while trying to reach the Austin knowledge base. Please try again.";

/// Shown when the remote capability returns an empty candidate.
pub const EMPTY_REPLY: &str = "I couldn't generate a response.";
