pub mod eclose;
pub mod embellish;
pub mod entry;
pub mod entry_list;
pub mod error;
pub mod imago;
pub mod larva;
pub mod logger;
pub mod options;
pub mod slug;
pub mod view;

#[cfg(test)]
mod test_data;
