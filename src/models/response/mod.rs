pub mod listener_ack;
