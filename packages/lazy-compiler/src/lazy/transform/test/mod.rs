mod imports_spec;
