mod motor_lifecycle;
mod plant_scan;
mod vsd_scaling;
