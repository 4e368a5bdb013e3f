mod work_dir;
