pub mod dashboard;
pub mod org_setup;
pub mod request_details;
pub mod request_form;
pub mod request_list;
