mod activity;
mod auth;
mod exam;
mod feed;
mod profile;
mod question;
mod resource;
mod story;

pub use activity::ActivityCommands;
pub use auth::{AuthCommands, AuthLoginArgs, AuthRegisterArgs};
pub use exam::ExamCommands;
pub use feed::{FeedArgs, FeedCommands};
pub use profile::ProfileCommands;
pub use question::QuestionCommands;
pub use resource::ResourceCommands;
pub use story::StoryCommands;
