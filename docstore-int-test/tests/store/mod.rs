mod listing_test;
mod store_test;
