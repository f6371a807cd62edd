use crate::{
    Result,
    commands::{Command, CommandCatalog},
    resp::ToArgs,
};

/// Buffers commands inside a [`pipeline`](crate::client::Client::pipeline)
/// scope.
///
/// Nothing is written to the server while the scope runs; on successful exit
/// the client writes every buffered command in submission order, then reads
/// the replies in the same order.
pub struct Pipeline<'a> {
    catalog: &'a CommandCatalog,
    commands: Vec<Command>,
}

impl<'a> Pipeline<'a> {
    pub(crate) fn new(catalog: &'a CommandCatalog) -> Self {
        Self {
            catalog,
            commands: Vec::new(),
        }
    }

    /// Queues a command by its registered name.
    pub fn queue(&mut self, name: &str, args: impl ToArgs) -> Result<()> {
        let command = self.catalog.resolve(name, args.to_args())?;
        self.commands.push(command);
        Ok(())
    }

    /// Queues an already-built command.
    pub fn queue_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub(crate) fn into_commands(self) -> Vec<Command> {
        self.commands
    }
}
