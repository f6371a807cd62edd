use bytes::Bytes;
use smallvec::SmallVec;

/// A single command argument, always carried as a byte string on the wire.
///
/// Numeric caller values are formatted to decimal ASCII on construction, so
/// an argument never needs re-encoding when a command is serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArg(Bytes);

/// The ordered argument list of a command.
pub type CommandArgs = SmallVec<[CommandArg; 10]>;

impl CommandArg {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for CommandArg {
    #[inline]
    fn from(str: &str) -> Self {
        Self(Bytes::copy_from_slice(str.as_bytes()))
    }
}

impl From<String> for CommandArg {
    #[inline]
    fn from(string: String) -> Self {
        Self(Bytes::from(string.into_bytes()))
    }
}

impl From<&[u8]> for CommandArg {
    #[inline]
    fn from(bytes: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(bytes))
    }
}

impl From<Bytes> for CommandArg {
    #[inline]
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}

impl From<char> for CommandArg {
    #[inline]
    fn from(ch: char) -> Self {
        let mut buf = [0u8; 4];
        (&*ch.encode_utf8(&mut buf)).into()
    }
}

impl From<bool> for CommandArg {
    #[inline]
    fn from(b: bool) -> Self {
        Self(Bytes::from_static(if b { b"1" } else { b"0" }))
    }
}

macro_rules! impl_command_arg_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CommandArg {
                #[inline]
                fn from(i: $t) -> Self {
                    let mut buf = itoa::Buffer::new();
                    Self(Bytes::copy_from_slice(buf.format(i).as_bytes()))
                }
            }
        )*
    };
}

impl_command_arg_from_integer!(i16, u16, i32, u32, i64, u64, isize, usize);

macro_rules! impl_command_arg_from_float {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CommandArg {
                #[inline]
                fn from(f: $t) -> Self {
                    let mut buf = dtoa::Buffer::new();
                    Self(Bytes::copy_from_slice(buf.format(f).as_bytes()))
                }
            }
        )*
    };
}

impl_command_arg_from_float!(f32, f64);

/// Conversion of caller values into zero, one or several command arguments.
///
/// Lists expand element-wise; lists of pairs flatten to an even-length
/// argument list preserving order, which is how mapping-shaped calls are
/// expressed.
pub trait ToArgs {
    /// Appends this value's arguments to `args`.
    fn write_args(&self, args: &mut CommandArgs);

    /// Collects this value's arguments.
    fn to_args(&self) -> CommandArgs {
        let mut args = CommandArgs::new();
        self.write_args(&mut args);
        args
    }
}

impl ToArgs for CommandArg {
    #[inline]
    fn write_args(&self, args: &mut CommandArgs) {
        args.push(self.clone());
    }
}

macro_rules! impl_to_args {
    ($($t:ty),*) => {
        $(
            impl ToArgs for $t {
                #[inline]
                fn write_args(&self, args: &mut CommandArgs) {
                    args.push(self.clone().into());
                }
            }
        )*
    };
}

impl_to_args!(
    &str, String, Bytes, char, bool, i16, u16, i32, u32, i64, u64, isize, usize, f32, f64
);

impl ToArgs for () {
    #[inline]
    fn write_args(&self, _args: &mut CommandArgs) {}
}

impl<T: ToArgs> ToArgs for Option<T> {
    #[inline]
    fn write_args(&self, args: &mut CommandArgs) {
        if let Some(value) = self {
            value.write_args(args);
        }
    }
}

impl<T: ToArgs> ToArgs for Vec<T> {
    fn write_args(&self, args: &mut CommandArgs) {
        for value in self {
            value.write_args(args);
        }
    }
}

impl<T: ToArgs> ToArgs for &[T] {
    fn write_args(&self, args: &mut CommandArgs) {
        for value in *self {
            value.write_args(args);
        }
    }
}

impl<T: ToArgs, const N: usize> ToArgs for [T; N] {
    fn write_args(&self, args: &mut CommandArgs) {
        for value in self {
            value.write_args(args);
        }
    }
}

macro_rules! impl_to_args_for_tuple {
    ($($id:ident : $idx:tt),+) => {
        impl<$($id: ToArgs),+> ToArgs for ($($id,)+) {
            fn write_args(&self, args: &mut CommandArgs) {
                $(self.$idx.write_args(args);)+
            }
        }
    };
}

impl_to_args_for_tuple!(A: 0, B: 1);
impl_to_args_for_tuple!(A: 0, B: 1, C: 2);
impl_to_args_for_tuple!(A: 0, B: 1, C: 2, D: 3);
impl_to_args_for_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_to_args_for_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
