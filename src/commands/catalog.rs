use crate::{
    Error, Result,
    commands::{
        Command, CommandDescriptor, empty_to_nil, info_to_map, integer_to_boolean, keys_to_list,
        pong_to_boolean, slaveof_no_one, sort_options,
    },
    resp::{CommandArgs, RequestEncoding},
};
use std::collections::HashMap;

/// Registry mapping callable names (lowercase verbs and stable aliases) to
/// command descriptors.
///
/// Looking up an unknown name is a client error. The mapping is read-mostly:
/// per-client registration is allowed before or between operations.
pub struct CommandCatalog {
    commands: HashMap<String, CommandDescriptor>,
}

impl Default for CommandCatalog {
    fn default() -> Self {
        Self::with_default_commands()
    }
}

fn inline(verb: &'static str) -> CommandDescriptor {
    CommandDescriptor::new(verb, RequestEncoding::Inline)
}

fn bulk(verb: &'static str) -> CommandDescriptor {
    CommandDescriptor::new(verb, RequestEncoding::Bulk)
}

fn multi_bulk(verb: &'static str) -> CommandDescriptor {
    CommandDescriptor::new(verb, RequestEncoding::MultiBulk)
}

impl CommandCatalog {
    /// An empty catalog; every command must be registered by hand.
    pub fn empty() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// The classic command set.
    pub fn with_default_commands() -> Self {
        let mut catalog = Self::empty();

        // connection handling
        catalog.register("ping", inline("PING").shaper(pong_to_boolean).not_shardable());
        catalog.register("auth", inline("AUTH").not_shardable());
        catalog.register("echo", bulk("ECHO").not_shardable());
        catalog.register("select", inline("SELECT").not_shardable());
        catalog.register(
            "quit",
            inline("QUIT").not_shardable().closes_connection(),
        );

        // server control
        catalog.register("info", inline("INFO").shaper(info_to_map).not_shardable());
        catalog.register("slaveof", inline("SLAVEOF").not_shardable().filter(slaveof_no_one));
        catalog.register("save", inline("SAVE").not_shardable());
        catalog.register("bgsave", inline("BGSAVE").not_shardable());
        catalog.register_aliased(
            ["lastsave", "last_save"],
            inline("LASTSAVE").not_shardable(),
        );
        catalog.register(
            "shutdown",
            inline("SHUTDOWN").not_shardable().closes_connection(),
        );
        catalog.register_aliased(["flushdb", "flush_db"], inline("FLUSHDB").not_shardable());
        catalog.register_aliased(
            ["flushall", "flush_all"],
            inline("FLUSHALL").not_shardable(),
        );
        catalog.register_aliased(["dbsize", "db_size"], inline("DBSIZE").not_shardable());

        // keyspace
        catalog.register("exists", inline("EXISTS").shaper(integer_to_boolean));
        catalog.register("del", inline("DEL").shaper(integer_to_boolean));
        catalog.register("type", inline("TYPE"));
        catalog.register("keys", inline("KEYS").shaper(keys_to_list).not_shardable());
        catalog.register_aliased(
            ["randomkey", "random_key"],
            inline("RANDOMKEY").shaper(empty_to_nil).not_shardable(),
        );
        catalog.register("rename", inline("RENAME").not_shardable());
        catalog.register(
            "renamenx",
            inline("RENAMENX").shaper(integer_to_boolean).not_shardable(),
        );
        catalog.register("expire", inline("EXPIRE").shaper(integer_to_boolean));
        catalog.register("expireat", inline("EXPIREAT").shaper(integer_to_boolean));
        catalog.register("ttl", inline("TTL"));
        catalog.register(
            "move",
            inline("MOVE").shaper(integer_to_boolean).not_shardable(),
        );
        catalog.register("sort", inline("SORT").filter(sort_options));

        // strings
        catalog.register("get", inline("GET"));
        catalog.register("set", multi_bulk("SET"));
        catalog.register_aliased(["getset", "get_set"], bulk("GETSET"));
        catalog.register_aliased(
            ["setnx", "set_preserve"],
            bulk("SETNX").shaper(integer_to_boolean),
        );
        catalog.register("mget", inline("MGET").not_shardable());
        catalog.register("mset", multi_bulk("MSET").not_shardable());
        catalog.register(
            "msetnx",
            multi_bulk("MSETNX").shaper(integer_to_boolean).not_shardable(),
        );
        catalog.register("incr", inline("INCR"));
        catalog.register("incrby", inline("INCRBY"));
        catalog.register("decr", inline("DECR"));
        catalog.register("decrby", inline("DECRBY"));
        catalog.register("append", bulk("APPEND"));

        // lists
        catalog.register("llen", inline("LLEN"));
        catalog.register("lrange", inline("LRANGE"));
        catalog.register("ltrim", inline("LTRIM"));
        catalog.register("lindex", inline("LINDEX"));
        catalog.register("lset", bulk("LSET"));
        catalog.register("lrem", bulk("LREM"));
        catalog.register_aliased(["lpush", "push_head"], bulk("LPUSH"));
        catalog.register_aliased(["rpush", "push_tail"], bulk("RPUSH"));
        catalog.register_aliased(["lpop", "pop_head"], inline("LPOP"));
        catalog.register_aliased(["rpop", "pop_tail"], inline("RPOP"));
        catalog.register("rpoplpush", bulk("RPOPLPUSH").not_shardable());

        // sets
        catalog.register("sadd", bulk("SADD").shaper(integer_to_boolean));
        catalog.register("srem", bulk("SREM").shaper(integer_to_boolean));
        catalog.register("spop", inline("SPOP"));
        catalog.register(
            "smove",
            bulk("SMOVE").shaper(integer_to_boolean).not_shardable(),
        );
        catalog.register("scard", inline("SCARD"));
        catalog.register("sismember", bulk("SISMEMBER").shaper(integer_to_boolean));
        catalog.register("smembers", inline("SMEMBERS"));
        catalog.register("sinter", inline("SINTER").not_shardable());
        catalog.register("sinterstore", inline("SINTERSTORE").not_shardable());
        catalog.register("sunion", inline("SUNION").not_shardable());
        catalog.register("sunionstore", inline("SUNIONSTORE").not_shardable());
        catalog.register("sdiff", inline("SDIFF").not_shardable());
        catalog.register("sdiffstore", inline("SDIFFSTORE").not_shardable());
        catalog.register("srandmember", inline("SRANDMEMBER"));

        // sorted sets
        catalog.register("zadd", bulk("ZADD").shaper(integer_to_boolean));
        catalog.register("zrem", bulk("ZREM").shaper(integer_to_boolean));
        catalog.register("zincrby", bulk("ZINCRBY"));
        catalog.register("zrange", inline("ZRANGE"));
        catalog.register("zrevrange", inline("ZREVRANGE"));
        catalog.register("zrangebyscore", inline("ZRANGEBYSCORE"));
        catalog.register("zcard", inline("ZCARD"));
        catalog.register("zscore", bulk("ZSCORE"));
        catalog.register("zremrangebyscore", inline("ZREMRANGEBYSCORE"));

        catalog
    }

    /// Registers a command under `name`, replacing any previous registration.
    pub fn register(&mut self, name: impl Into<String>, descriptor: CommandDescriptor) {
        self.commands.insert(name.into(), descriptor);
    }

    /// Registers a batch of commands.
    pub fn register_all<N: Into<String>>(
        &mut self,
        commands: impl IntoIterator<Item = (N, CommandDescriptor)>,
    ) {
        for (name, descriptor) in commands {
            self.register(name, descriptor);
        }
    }

    fn register_aliased<const N: usize>(
        &mut self,
        names: [&str; N],
        descriptor: CommandDescriptor,
    ) {
        for name in names {
            self.register(name, descriptor.clone());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Resolves `name` into a command bound to `args`.
    pub fn resolve(&self, name: &str, args: CommandArgs) -> Result<Command> {
        let descriptor = self
            .commands
            .get(name)
            .ok_or_else(|| Error::Client(format!("unknown command '{name}'")))?;
        Command::new(descriptor.clone(), args)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        commands::CommandCatalog,
        resp::{RequestEncoding, ToArgs},
    };

    #[test]
    fn unknown_name_is_a_client_error() {
        let catalog = CommandCatalog::with_default_commands();
        assert!(matches!(
            catalog.resolve("teleport", ().to_args()),
            Err(Error::Client(_))
        ));
    }

    #[test]
    fn aliases_resolve_to_the_same_verb() {
        let catalog = CommandCatalog::with_default_commands();
        let canonical = catalog.resolve("getset", ("k", "v").to_args()).unwrap();
        let aliased = catalog.resolve("get_set", ("k", "v").to_args()).unwrap();
        assert_eq!("GETSET", canonical.verb());
        assert_eq!("GETSET", aliased.verb());

        assert_eq!(
            "SETNX",
            catalog
                .resolve("set_preserve", ("k", "v").to_args())
                .unwrap()
                .verb()
        );
    }

    #[test]
    fn incr_and_decr_are_distinct() {
        let catalog = CommandCatalog::with_default_commands();
        assert_eq!("INCR", catalog.resolve("incr", "k".to_args()).unwrap().verb());
        assert_eq!("DECR", catalog.resolve("decr", "k".to_args()).unwrap().verb());
    }

    #[test]
    fn routing_flags() {
        let catalog = CommandCatalog::with_default_commands();

        let get = catalog.resolve("get", "foo".to_args()).unwrap();
        assert_eq!(Some(&b"foo"[..]), get.routing_key());

        // non-shardable commands never expose a routing key, even with a
        // non-empty first argument
        for name in ["ping", "keys", "mget", "rename", "smove", "info"] {
            let command = catalog.resolve(name, "foo".to_args()).unwrap();
            assert_eq!(None, command.routing_key(), "{name}");
        }
    }

    #[test]
    fn closing_commands() {
        let catalog = CommandCatalog::with_default_commands();
        assert!(catalog.resolve("quit", ().to_args()).unwrap().closes_connection());
        assert!(
            catalog
                .resolve("shutdown", ().to_args())
                .unwrap()
                .closes_connection()
        );
        assert!(!catalog.resolve("get", "k".to_args()).unwrap().closes_connection());
    }

    #[test]
    fn custom_registration() {
        use crate::commands::CommandDescriptor;

        let mut catalog = CommandCatalog::with_default_commands();
        assert!(!catalog.contains("object"));
        catalog.register(
            "object",
            CommandDescriptor::new("OBJECT", RequestEncoding::Inline),
        );
        assert_eq!(
            "OBJECT",
            catalog
                .resolve("object", ("REFCOUNT", "k").to_args())
                .unwrap()
                .verb()
        );
    }
}
