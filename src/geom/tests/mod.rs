mod test_shapes_basic;
