mod ir_output;
