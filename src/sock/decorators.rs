use super::{ComplexSock, Endpoint, MessagePart, MessageSock, SockInfo, SocketFactory, SocketParams, SockDocViewer};
use crate::error::Result;
use crate::pattern::Pattern;
use pretty_hex::PrettyHex;

macro_rules! socket_decorator {
    ($name: ident) => {
        pub struct $name {
            sock: Box<dyn ComplexSock>,
        }
        impl $name {
            pub fn new(sock: Box<dyn ComplexSock>) -> Box<dyn ComplexSock> {
                Box::new(Self { sock })
            }
        }
        impl SockInfo for $name {
            fn get_type_name(&self) -> &str {
                self.sock.get_type_name()
            }
            fn get_id(&self) -> u32 {
                self.sock.get_id()
            }
            fn get_description(&self) -> String {
                self.sock.get_description()
            }
        }
        paste::paste! {
            pub struct [< $name Factory >] {
                factory: Box<dyn SocketFactory>,
            }
            impl [< $name Factory >] {
                pub fn new(factory: Box<dyn SocketFactory>) -> Box<dyn SocketFactory> {
                    Box::new(Self { factory })
                }
            }
            impl SocketFactory for [< $name Factory >] {
                fn create_sock(&self, pattern: Pattern, params: &SocketParams) -> Result<Box<dyn ComplexSock>> {
                    Ok($name::new(self.factory.create_sock(pattern, params)?))
                }
                fn create_doc_viewer(&self) -> Box<dyn SockDocViewer> {
                    self.factory.create_doc_viewer()
                }
            }
        }
    };
}

macro_rules! decorator_openclose_default {
    () => {
        fn open(&mut self, endpoint: &Endpoint) -> Result<()> {
            self.sock.open(endpoint)
        }
        fn close(&mut self) {
            self.sock.close();
        }
    };
}

socket_decorator!(TraceInfoDecorator);

impl MessageSock for TraceInfoDecorator {
    fn open(&mut self, endpoint: &Endpoint) -> Result<()> {
        self.sock.open(endpoint)?;
        if endpoint.bind {
            log::info!("{} bound to {}", self.sock.get_description(), endpoint);
        } else {
            log::info!("{} connected to {}", self.sock.get_description(), endpoint);
        }
        Ok(())
    }
    fn close(&mut self) {
        log::info!("Socket is closed: {}", self.sock.get_description());
        self.sock.close();
    }
    fn send(&mut self, payload: Vec<u8>) -> Result<()> {
        log::info!("sending {} bytes", payload.len());
        self.sock.send(payload)
    }
    fn recv_part(&mut self) -> Result<MessagePart> {
        let part = self.sock.recv_part()?;
        log::info!("receiving {} bytes", part.data.len());
        Ok(part)
    }
}

socket_decorator!(TraceCanonicalDecorator);

impl MessageSock for TraceCanonicalDecorator {
    fn send(&mut self, payload: Vec<u8>) -> Result<()> {
        log::debug!("Sent data (canonical format):\n{:?}", payload.hex_dump());
        self.sock.send(payload)
    }
    fn recv_part(&mut self) -> Result<MessagePart> {
        let part = self.sock.recv_part()?;
        log::debug!(
            "Received data (canonical format, more: {}):\n{:?}",
            part.more,
            part.data.hex_dump()
        );
        Ok(part)
    }
    decorator_openclose_default!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sock::SocketWrapper;
    use crate::test_helpers::{Event, ScriptedFactory};
    use std::io::Cursor;

    #[test]
    fn decorators_are_transparent() {
        let inner = ScriptedFactory::new(vec![MessagePart::more("a"), MessagePart::last("b")]);
        let factory = TraceCanonicalDecoratorFactory::new(TraceInfoDecoratorFactory::new(
            Box::new(inner.clone()),
        ));
        let sock = factory.create_sock(Pattern::Request, &SocketParams::default()).unwrap();
        let description = sock.get_description();
        let mut wrapper = SocketWrapper::new(sock).open(&Endpoint::bind("inproc://d")).unwrap();
        assert_eq!(wrapper.description(), description);

        wrapper.send_from(&mut Cursor::new(b"ping".to_vec()), 2).unwrap();
        let mut out = Vec::new();
        wrapper.recv_to(&mut out).unwrap();
        drop(wrapper);

        assert_eq!(out, b"ab");
        assert_eq!(
            inner.events(),
            vec![
                Event::Open(Endpoint::bind("inproc://d")),
                Event::Send(b"ping".to_vec()),
                Event::Receive(1),
                Event::Receive(1),
                Event::Close,
            ]
        );
    }
}
