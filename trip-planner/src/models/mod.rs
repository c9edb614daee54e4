pub mod chat;
pub mod conversation;
pub mod debug;
pub mod region;
pub mod selection;
pub mod session;
pub mod view;

pub use chat::{ChatReply, ChatRequest};
pub use conversation::{ChatTurn, ConversationLog, Role};
pub use debug::DebugTrace;
pub use region::Region;
pub use selection::Selection;
pub use session::{PlannerSession, RequestPhase};
