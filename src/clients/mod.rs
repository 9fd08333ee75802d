pub mod oltp;
