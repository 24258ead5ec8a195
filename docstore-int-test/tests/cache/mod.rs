mod cache_test;
