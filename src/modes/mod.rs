pub mod doc;
pub mod relay;

pub trait Command {
    fn execute(&mut self);
}
