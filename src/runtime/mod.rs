mod buff;
mod exec;
mod regexp;

pub use self::buff::{
    named_buff_exists, named_buff_fetch, named_buff_iter, numbered_buff_fetch, numbered_buff_length,
    numbered_buff_store, Captured,
};
pub use self::regexp::{Compiled, Regexp};
