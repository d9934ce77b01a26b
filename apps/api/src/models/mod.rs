pub mod answer;
pub mod meta;
pub mod question;
pub mod user;
