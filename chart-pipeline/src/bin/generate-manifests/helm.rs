/// Contains the client which runs helm commands.
pub(crate) mod client;
