pub mod zeromq;
