pub mod activity;
pub mod auth;
pub mod dispatch;
pub mod exam;
pub mod feed;
pub mod onboard;
pub mod profile;
pub mod question;
pub mod resource;
pub mod search;
pub mod secret;
pub mod shared;
pub mod story;
