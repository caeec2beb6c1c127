mod community_post;
mod view_record;

pub use community_post::*;
pub use view_record::*;
