pub mod rbsim_vis2d;
