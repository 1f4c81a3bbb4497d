mod adjuster_tests;
