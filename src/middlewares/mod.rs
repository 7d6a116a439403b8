pub mod retry_transport_errors;
