pub mod asg;
