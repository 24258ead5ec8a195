mod find_test;
