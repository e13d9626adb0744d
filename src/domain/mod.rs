pub mod commit;
pub mod notification;
