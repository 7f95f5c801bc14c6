pub mod webhook_response;
pub mod webhook_route;
