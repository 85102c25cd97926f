mod htip;
mod lldp;
mod projection;
