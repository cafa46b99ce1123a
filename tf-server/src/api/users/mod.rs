pub mod user_data_response;
pub mod users;
