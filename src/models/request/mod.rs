pub mod raw_request;
